// Domain layer: day parts, client capability tags and the HTTP port.

pub mod clients;
pub mod day_part;
pub mod ports;
