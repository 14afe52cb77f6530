use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{BuildingId, BuildingKind, Position, TreeId, WorkerId};
use crate::world::{ConstructionError, World};

/// Player orders accepted by the colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SelectWorker { worker: WorkerId },
    AssignToTree { worker: WorkerId, tree: TreeId },
    AssignToBuilding { worker: WorkerId, building: BuildingId },
    Construct { kind: BuildingKind, x: f32, y: f32 },
    Feed { worker: WorkerId },
}

/// A command queued for a specific tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub tick: u64,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("no worker with id {0:?}")]
    UnknownWorker(WorkerId),
    #[error("tree {0:?} is missing or depleted")]
    TreeUnavailable(TreeId),
    #[error("building {0:?} is missing or takes no more workers")]
    BuildingUnavailable(BuildingId),
    #[error("worker {0:?} is sheltering")]
    WorkerBusy(WorkerId),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl World {
    pub fn apply(&mut self, command: &Command) -> Result<(), CommandError> {
        match *command {
            Command::SelectWorker { worker } => {
                if !self.select_worker(worker) {
                    return Err(CommandError::UnknownWorker(worker));
                }
            }
            Command::AssignToTree { worker, tree } => {
                self.require_worker(worker)?;
                if !self.assign_worker_to_tree(worker, tree) {
                    return Err(CommandError::TreeUnavailable(tree));
                }
            }
            Command::AssignToBuilding { worker, building } => {
                self.require_worker(worker)?;
                if !self.assign_worker_to_building(worker, building) {
                    return Err(CommandError::BuildingUnavailable(building));
                }
            }
            Command::Construct { kind, x, y } => {
                self.construct_building(kind, Position::new(x, y))?;
            }
            Command::Feed { worker } => {
                self.require_worker(worker)?;
                if !self.feed_worker(worker) {
                    return Err(CommandError::WorkerBusy(worker));
                }
            }
        }
        Ok(())
    }

    fn require_worker(&self, worker: WorkerId) -> Result<(), CommandError> {
        match self.worker(worker) {
            Some(_) => Ok(()),
            None => Err(CommandError::UnknownWorker(worker)),
        }
    }
}
