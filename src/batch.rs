//! Publish or delete every deposition listed in a deposit log
//!
//! IDs are independent: a failure is logged and the batch moves on to the next ID.

use log::{error, info};

use crate::zenodo::{DepositionId, ZenodoClient, ZenodoError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BatchAction {
    Publish,
    /// Only drafts can be deleted
    Delete,
}

impl BatchAction {
    fn verb(&self) -> &'static str {
        match self {
            BatchAction::Publish => "Publishing",
            BatchAction::Delete => "Deleting",
        }
    }

    fn done(&self) -> &'static str {
        match self {
            BatchAction::Publish => "published",
            BatchAction::Delete => "deleted",
        }
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub id: DepositionId,
    pub result: Result<(), ZenodoError>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

pub async fn run_batch(client: &ZenodoClient, action: BatchAction, ids: &[DepositionId]) -> Vec<BatchOutcome> {
    let mut outcomes = Vec::with_capacity(ids.len());

    for &id in ids {
        info!("{} deposition {}", action.verb(), id);
        let result = match action {
            BatchAction::Publish => client.publish(id).await,
            BatchAction::Delete => client.delete(id).await,
        };

        match &result {
            Ok(()) => info!("Deposition {} successfully {}", id, action.done()),
            Err(err) if err.status() == Some(500) => {
                error!("Something went wrong. Status code: 500")
            }
            Err(err) => error!("{}", err),
        }
        outcomes.push(BatchOutcome { id, result });
    }

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    info!("{} of {} depositions {}", ids.len() - failed, ids.len(), action.done());
    outcomes
}
