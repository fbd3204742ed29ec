// Domain layer: lead records, catalogs and ports. No provider or transport code here.

pub mod catalog;
pub mod model;
pub mod ports;
