use chrono::{Datelike, NaiveDate};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::order_sequences;

/// Order-number families. Each gets an independent counter per calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Purchase,
    Sales,
    Inbound,
    Outbound,
}

impl OrderKind {
    pub fn prefix(self) -> &'static str {
        match self {
            OrderKind::Purchase => "PO",
            OrderKind::Sales => "SO",
            OrderKind::Inbound => "IN",
            OrderKind::Outbound => "OUT",
        }
    }
}

/// Allocates the next order id for `kind` in the month of `date`, e.g.
/// "PO202401003". The counter row is read and written on `conn`, so callers
/// allocating inside a transaction get rollback of the counter for free.
/// Sequence numbers are zero-padded to three digits and simply grow wider
/// past 999 rather than wrapping.
pub async fn next_order_id<C: ConnectionTrait>(
    conn: &C,
    kind: OrderKind,
    date: NaiveDate,
) -> Result<String, sea_orm::DbErr> {
    let partition = format!("{}{:04}{:02}", kind.prefix(), date.year(), date.month());

    let seq = match order_sequences::Entity::find_by_id(partition.clone())
        .one(conn)
        .await?
    {
        Some(row) => {
            let next = row.last_seq + 1;
            let mut active: order_sequences::ActiveModel = row.into();
            active.last_seq = Set(next);
            active.update(conn).await?;
            next
        }
        None => {
            order_sequences::ActiveModel {
                prefix: Set(partition.clone()),
                last_seq: Set(1),
            }
            .insert(conn)
            .await?;
            1
        }
    };

    Ok(format!("{partition}{seq:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_match_order_families() {
        assert_eq!(OrderKind::Purchase.prefix(), "PO");
        assert_eq!(OrderKind::Sales.prefix(), "SO");
        assert_eq!(OrderKind::Inbound.prefix(), "IN");
        assert_eq!(OrderKind::Outbound.prefix(), "OUT");
    }

    #[test]
    fn partition_embeds_zero_padded_year_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let partition = format!(
            "{}{:04}{:02}",
            OrderKind::Sales.prefix(),
            date.year(),
            date.month()
        );
        assert_eq!(partition, "SO202403");
    }
}
