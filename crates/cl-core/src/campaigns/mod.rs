//! Built-in campaign declarations.
//!
//! One module per campaign, each exposing the descriptor set and its
//! dispatch plan. Declarations are literal and static; nothing here reads
//! config files or touches the network.

pub mod july2020;
