pub mod error;
pub mod payroll;

pub use error::DisburseError;
pub use payroll::{
    DisbursementReceipt, DisbursementRequest, InsufficientBalanceReport, NormalizedBatch,
    PaymentLineItem,
};
