pub mod summary;

pub use summary::{PaymentSummary, NOT_AVAILABLE};
