pub mod payroll;

pub use payroll::PayrollState;
