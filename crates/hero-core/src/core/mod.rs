pub mod cooldown;
pub mod health;
pub mod invincibility;
pub mod rng;
pub mod time;
pub mod timer;
