pub mod bio;
pub mod career;
pub mod games;
pub mod player;
pub mod schedule;
