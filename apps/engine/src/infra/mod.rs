pub mod locks;

pub use locks::GameLockRegistry;
