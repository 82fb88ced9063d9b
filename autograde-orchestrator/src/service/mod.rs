//! Service layer
//!
//! Services contain the pipeline's business logic, composed from the
//! repository traits and the queue. All collaborators are injected so each
//! service is testable against in-memory implementations.

pub mod descriptor;
pub mod processor;
pub mod result;
pub mod submit;

pub use descriptor::DescriptorBuilder;
pub use processor::GradingProcessor;
pub use result::ResultService;
pub use submit::SubmitService;
