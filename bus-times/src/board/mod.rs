//! The bus-times view: upcoming arrivals at a stop.

mod arrival;
mod build;
mod countdown;

pub use arrival::{Arrival, ArrivalBoard, BoardError, BoardResult, BusRow};
pub use build::build_board;
pub use countdown::format_countdown;

use serde_json::{Value, json};

/// JSON rendering of a board, or of the reason there is none.
pub fn board_json(result: &BoardResult) -> Value {
    match result {
        Ok(board) => json!(board),
        Err(err) => {
            let mut value = json!({ "error": err.to_string() });
            if let BoardError::NoUpcomingBuses { stop_id } = err {
                value["stop_id"] = json!(stop_id);
            }
            value
        }
    }
}
