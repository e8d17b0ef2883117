//! Repair of missing genotype calls.
//!
//! A sample column whose genotype is `./.` or `.|.` becomes `0/0` or `0|0`, and
//! its GQ (when FORMAT has one) is replaced by the configured value. A column
//! that is just `.` is expanded to one subfield per FORMAT key. Called
//! genotypes are left exactly as they are.

pub mod normalizer;
