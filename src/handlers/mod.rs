pub mod disburse;
