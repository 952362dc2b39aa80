pub mod binder;
pub mod export;
pub mod inspect;
pub mod logs;
pub mod registry;
pub mod series;
