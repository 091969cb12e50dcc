//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter            | Implements  | Connects to                    |
//! |--------------------|-------------|--------------------------------|
//! | `gpio`             | InputPort   | embedded-hal pins (rppal)      |
//! | `sim_gpio`         | (pins)      | In-memory simulated board      |
//! | `log_sink`         | EventSink   | `log` facade                   |
//! | `terminal_display` | DisplayPort | stdout                         |
//! | `time`             | TimePort    | `std::time::Instant`           |

pub mod gpio;
pub mod log_sink;
pub mod sim_gpio;
pub mod terminal_display;
pub mod time;
