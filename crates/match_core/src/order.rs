//! Orders and their wire-format enums (spec §3, §6).

use serde::Serialize;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Unique order identifier, assigned by the API adapter at submission
/// time (`uuid.New()` in the original's `trade/api/api.go`).
pub type OrderId = Uuid;

/// Error returned when an out-of-range wire value can't be decoded into
/// one of this module's enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid wire value {0}")]
pub struct InvalidWireValue(pub u8);

macro_rules! wire_enum {
    ($name:ident { $($variant:ident = $value:literal => $str:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        #[serde(into = "u8")]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            /// Lowercase wire string form (spec §6: "String forms are the
            /// lowercase names").
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $str),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = InvalidWireValue;
            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant)),+,
                    other => Err(InvalidWireValue(other)),
                }
            }
        }
    };
}

wire_enum!(Transaction {
    Buy = 1 => "buy",
    Sell = 2 => "sell",
});

wire_enum!(OrderType {
    Market = 1 => "market",
    Limit = 2 => "limit",
});

wire_enum!(Status {
    Placed = 1 => "placed",
    TimedOut = 2 => "timedout",
    Completed = 3 => "completed",
});

/// An order placed for trade.
///
/// Invariant: `executed + remaining == placed_quantity` at all times.
/// `status` transitions monotonically `Placed -> {Completed, TimedOut}`
/// and never reverses.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    /// Nanoseconds since the Unix epoch, assigned at submission.
    pub submitted_at_ns: i64,
    pub transaction: Transaction,
    pub order_type: OrderType,
    pub placed_quantity: i64,
    pub remaining: i64,
    pub executed: i64,
    pub price: i64,
    pub status: Status,
}

impl Order {
    /// Builds a freshly placed order with a new id and submission time
    /// (the API adapter's responsibility in spec §3's order lifecycle).
    pub fn new(transaction: Transaction, order_type: OrderType, quantity: i64, price: i64) -> Self {
        let submitted_at_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_nanos() as i64;
        Self {
            id: Uuid::new_v4(),
            submitted_at_ns,
            transaction,
            order_type,
            placed_quantity: quantity,
            remaining: quantity,
            executed: 0,
            price,
            status: Status::Placed,
        }
    }

    /// Conservation invariant check (spec §8 property 5).
    pub fn conserved(&self) -> bool {
        self.executed + self.remaining == self.placed_quantity
    }

    /// Age since submission, in seconds.
    pub fn age_seconds(&self) -> i64 {
        let now_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before unix epoch")
            .as_nanos() as i64;
        (now_ns - self.submitted_at_ns) / 1_000_000_000
    }

    /// Renders a completion-sink listing line (spec §4.7):
    /// `<id>/<time> => [ <side>, <price>, <placed>, <executed>, <remaining>, <status> ]`.
    pub fn listing_line(&self) -> String {
        format!(
            "{}/{} => [ {}, {}, {}, {}, {}, {} ]",
            self.id,
            self.submitted_at_ns,
            self.transaction,
            self.price,
            self.placed_quantity,
            self.executed,
            self.remaining,
            self.status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roundtrip() {
        assert_eq!(Transaction::try_from(1).unwrap(), Transaction::Buy);
        assert_eq!(Transaction::try_from(2).unwrap(), Transaction::Sell);
        assert!(Transaction::try_from(3).is_err());

        assert_eq!(OrderType::try_from(1).unwrap(), OrderType::Market);
        assert_eq!(OrderType::try_from(2).unwrap(), OrderType::Limit);

        assert_eq!(Status::try_from(1).unwrap(), Status::Placed);
        assert_eq!(Status::try_from(2).unwrap(), Status::TimedOut);
        assert_eq!(Status::try_from(3).unwrap(), Status::Completed);
    }

    #[test]
    fn display_is_lowercase_name() {
        assert_eq!(Transaction::Buy.to_string(), "buy");
        assert_eq!(Status::TimedOut.to_string(), "timedout");
    }

    #[test]
    fn new_order_is_conserved_and_placed() {
        let order = Order::new(Transaction::Buy, OrderType::Limit, 34, 821);
        assert!(order.conserved());
        assert_eq!(order.status, Status::Placed);
        assert_eq!(order.remaining, 34);
        assert_eq!(order.executed, 0);
    }
}
