//! Input decoding for the encoder board: quadrature decoder and button
//! edge detector. Pure state machines, no I/O.

pub mod button;
pub mod encoder;
