//! Task activity and who gets notified about it

use serde::Deserialize;

use taskboard_core::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A task was created for the assignee
    Assigned,
    /// The assigner edited the task
    Updated,
    /// The assignee moved the task to another status
    StatusChanged,
    Commented,
}

/// Something a user did to a task
#[derive(Debug, Clone, Deserialize)]
pub struct TaskActivity {
    pub kind: ActivityKind,
    pub task_id: TaskId,
    pub title: String,
    pub assigner: String,
    pub assignee: String,
}

/// A notification to be delivered to `recipient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: String,
    pub text: String,
}

impl TaskActivity {
    /// Notifications caused by `actor` performing this activity.
    ///
    /// The actor is skipped for every kind except `StatusChanged`, which always
    /// reaches the assigner. A user receives at most one notification per activity.
    pub fn deliveries(&self, actor: &str) -> Vec<Delivery> {
        let title = &self.title;
        let skip_actor = self.kind != ActivityKind::StatusChanged;
        let (recipients, text): (Vec<&str>, String) = match self.kind {
            ActivityKind::Assigned => (
                vec![self.assignee.as_str()],
                format!("{} assigned you task \"{}\"", actor, title),
            ),
            ActivityKind::Updated => (
                vec![self.assignee.as_str()],
                format!("{} updated task \"{}\"", actor, title),
            ),
            ActivityKind::StatusChanged => (
                vec![self.assigner.as_str()],
                format!("{} updated task \"{}\" status", actor, title),
            ),
            ActivityKind::Commented => (
                vec![self.assignee.as_str(), self.assigner.as_str()],
                format!("{} commented on task \"{}\"", actor, title),
            ),
        };

        let mut deliveries: Vec<Delivery> = Vec::new();
        for recipient in recipients {
            if (skip_actor && recipient == actor)
                || deliveries.iter().any(|d| d.recipient == recipient)
            {
                continue;
            }
            deliveries.push(Delivery {
                recipient: recipient.to_string(),
                text: text.clone(),
            });
        }
        deliveries
    }
}
