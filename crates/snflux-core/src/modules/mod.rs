pub mod pinched;
pub mod report;
pub mod serialization;

mod traits;

pub use pinched::PinchedModule;
pub use traits::{FluxRow, FluxSink, ModuleExecutor, TableWriter};
