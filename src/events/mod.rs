pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_transport_keys;
pub use pointer::wire_pointer_move;
