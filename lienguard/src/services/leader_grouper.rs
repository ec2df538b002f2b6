//! Per-leader grouping and notification fan-out
//!
//! Groups the final missing-info records by leader and walks the groups in a
//! stable order: biggest workload first, ties broken alphabetically. A
//! notification failure for one leader never blocks the rest; failed leaders
//! are collected and reported upward.

use crate::models::{LeaderBatch, MissingInfoRecord};
use crate::services::notifier::Notify;
use lienguard_common::{Error, Result};

/// Group records by leader, ordered by group size descending then leader
/// name ascending. Record order within a group follows input order.
pub fn group_by_leader(records: Vec<MissingInfoRecord>) -> Vec<LeaderBatch> {
    let mut batches: Vec<LeaderBatch> = Vec::new();
    for record in records {
        match batches.iter_mut().find(|b| b.leader == record.leader) {
            Some(batch) => batch.records.push(record),
            None => batches.push(LeaderBatch {
                leader: record.leader.clone(),
                leader_email: record.leader_email.clone(),
                records: vec![record],
            }),
        }
    }

    batches.sort_by(|a, b| {
        b.records
            .len()
            .cmp(&a.records.len())
            .then_with(|| a.leader.cmp(&b.leader))
    });
    batches
}

/// Notify each batch in order. Per-leader failures are logged and collected;
/// the overall call fails only after every batch has been attempted.
///
/// Returns the number of batches delivered.
pub async fn notify_all<N: Notify>(notifier: &N, batches: &[LeaderBatch]) -> Result<usize> {
    let mut failed: Vec<String> = Vec::new();
    let mut delivered = 0usize;
    for batch in batches {
        match notifier.notify(batch).await {
            Ok(()) => {
                tracing::info!(
                    leader = %batch.leader,
                    records = batch.records.len(),
                    "Sent missing-info notification"
                );
                delivered += 1;
            }
            Err(e) => {
                tracing::error!(leader = %batch.leader, error = %e, "Notification failed");
                failed.push(batch.leader.clone());
            }
        }
    }

    if failed.is_empty() {
        Ok(delivered)
    } else {
        Err(Error::Transport(format!(
            "notification failed for {} leader(s): {}",
            failed.len(),
            failed.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Company;
    use crate::models::LeaderBatch;

    fn record(project_number: &str, leader: &str) -> MissingInfoRecord {
        MissingInfoRecord {
            company: Company::Hts,
            project_number: project_number.to_string(),
            project_nickname: None,
            customer_name: None,
            customer_phone: None,
            customer_address: None,
            customer_city: None,
            customer_state: None,
            customer_zip: None,
            customer_role: None,
            gc_name: None,
            gc_address: None,
            gc_city: None,
            gc_state: None,
            gc_zip: None,
            owner_name: None,
            owner_address: None,
            owner_city: None,
            owner_state: None,
            owner_zip: None,
            leader: leader.to_string(),
            leader_email: format!("{}@example.com", leader.to_lowercase().replace(' ', ".")),
            url: None,
        }
    }

    fn sized_input() -> Vec<MissingInfoRecord> {
        let mut records = Vec::new();
        for i in 0..5 {
            records.push(record(&format!("2020000{i}-HTS-1"), "Cara Voss"));
        }
        for i in 0..3 {
            records.push(record(&format!("2020010{i}-HTS-1"), "Ben Li"));
        }
        for i in 0..3 {
            records.push(record(&format!("2020020{i}-HTS-1"), "Amy Ray"));
        }
        records.push(record("20200300-HTS-1", "Dee Cho"));
        records
    }

    #[test]
    fn groups_order_by_size_then_name() {
        let batches = group_by_leader(sized_input());
        let order: Vec<(&str, usize)> = batches
            .iter()
            .map(|b| (b.leader.as_str(), b.records.len()))
            .collect();
        assert_eq!(
            order,
            vec![("Cara Voss", 5), ("Amy Ray", 3), ("Ben Li", 3), ("Dee Cho", 1)]
        );
    }

    #[test]
    fn records_keep_input_order_within_group() {
        let batches = group_by_leader(sized_input());
        let cara = &batches[0];
        let projects: Vec<&str> = cara.records.iter().map(|r| r.project_number.as_str()).collect();
        assert_eq!(
            projects,
            vec![
                "20200000-HTS-1",
                "20200001-HTS-1",
                "20200002-HTS-1",
                "20200003-HTS-1",
                "20200004-HTS-1"
            ]
        );
    }

    struct FlakyNotifier {
        fail_for: &'static str,
    }

    impl Notify for FlakyNotifier {
        async fn notify(&self, batch: &LeaderBatch) -> lienguard_common::Result<()> {
            if batch.leader == self.fail_for {
                Err(Error::Transport("endpoint refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn failure_for_one_leader_does_not_block_the_rest() {
        let batches = group_by_leader(sized_input());
        let notifier = FlakyNotifier { fail_for: "Amy Ray" };
        let err = notify_all(&notifier, &batches).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1 leader(s)"));
        assert!(msg.contains("Amy Ray"));
    }

    #[tokio::test]
    async fn all_delivered_returns_count() {
        struct AlwaysOk;
        impl Notify for AlwaysOk {
            async fn notify(&self, _batch: &LeaderBatch) -> lienguard_common::Result<()> {
                Ok(())
            }
        }
        let batches = group_by_leader(sized_input());
        assert_eq!(notify_all(&AlwaysOk, &batches).await.unwrap(), 4);
    }
}
