use serde::{Deserialize, Serialize};

/// Purchase order lifecycle. Transitions are not restricted; the caller
/// may move an order to any status, including back out of a terminal one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Sales order lifecycle, enforced by [`SalesOrderStatus::can_transition_to`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SalesOrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Completed,
    Cancelled,
}

impl SalesOrderStatus {
    pub fn can_transition_to(self, next: SalesOrderStatus) -> bool {
        use SalesOrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Shipped)
                | (Confirmed, Cancelled)
                | (Shipped, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SalesOrderStatus::Completed | SalesOrderStatus::Cancelled)
    }
}

/// Warehouse movement (inbound/outbound) lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperateStatus {
    Processing,
    Completed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(SalesOrderStatus::Pending, SalesOrderStatus::Confirmed)]
    #[case(SalesOrderStatus::Pending, SalesOrderStatus::Cancelled)]
    #[case(SalesOrderStatus::Confirmed, SalesOrderStatus::Shipped)]
    #[case(SalesOrderStatus::Confirmed, SalesOrderStatus::Cancelled)]
    #[case(SalesOrderStatus::Shipped, SalesOrderStatus::Completed)]
    fn sales_status_allows_documented_transitions(
        #[case] from: SalesOrderStatus,
        #[case] to: SalesOrderStatus,
    ) {
        assert!(from.can_transition_to(to));
    }

    #[test]
    fn sales_status_rejects_everything_else() {
        use SalesOrderStatus::*;
        let all = [Pending, Confirmed, Shipped, Completed, Cancelled];
        let allowed = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, Shipped),
            (Confirmed, Cancelled),
            (Shipped, Completed),
        ];
        for from in all {
            for to in all {
                let expected = allowed.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        use SalesOrderStatus::*;
        for to in [Pending, Confirmed, Shipped, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(to));
            assert!(!Cancelled.can_transition_to(to));
        }
    }

    #[test]
    fn statuses_round_trip_as_lowercase_strings() {
        assert_eq!(PurchaseOrderStatus::Pending.to_string(), "pending");
        assert_eq!(SalesOrderStatus::Shipped.to_string(), "shipped");
        assert_eq!(OperateStatus::Processing.to_string(), "processing");
        assert_eq!(
            SalesOrderStatus::from_str("confirmed").unwrap(),
            SalesOrderStatus::Confirmed
        );
        assert!(SalesOrderStatus::from_str("Confirmed").is_err());
        assert!(OperateStatus::from_str("done").is_err());
    }
}
