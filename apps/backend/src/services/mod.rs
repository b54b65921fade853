pub mod room_flow;
