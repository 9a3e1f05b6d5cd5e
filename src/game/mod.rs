pub mod orchestrator;
pub mod store;
pub mod win;

pub use store::GameStore;
pub use win::evaluate;
