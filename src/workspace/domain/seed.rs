//! Fixed seed records used when the remote store has nothing to offer.

use super::{
    Priority, Progress, Project, ProjectHealth, ProjectStatus, Task, TaskStatus, User,
    project::calendar_date,
};

/// Team members used when no remote user record exists.
#[must_use]
pub fn default_users() -> Vec<User> {
    vec![
        User::new("u1", "Sarah Chen", "UX Lead")
            .with_skills(["Figma", "React"])
            .with_capacity_per_week(30),
        User::new("u2", "Alex Rivera", "Architect")
            .with_skills(["Go", "K8s"])
            .with_capacity_per_week(40),
        User::new("u3", "Mike Ross", "Fullstack")
            .with_skills(["Node", "SQL"])
            .with_capacity_per_week(35),
    ]
}

/// Sample portfolio for bootstrapping an empty store.
#[must_use]
pub fn sample_projects() -> Vec<Project> {
    let apollo = Project::new("p1", "Apollo Re-launch", "James Miller")
        .with_description(
            "Modernizing the legacy flight control systems for high-altitude orbital testing.",
        )
        .with_progress(Progress::saturating(65))
        .with_status(ProjectStatus::Active)
        .with_priority(Priority::High)
        .with_health(ProjectHealth::Healthy)
        .with_schedule(calendar_date(2024, 1, 10), calendar_date(2024, 12, 31))
        .with_members(["Alex Rivera", "Sarah Chen", "Mike Ross"])
        .with_tasks([
            Task::new(
                "t1",
                "Backend API Optimization",
                TaskStatus::InProgress,
                calendar_date(2024, 6, 15),
            )
            .with_project_id("p1")
            .with_description("Refactor Node.js endpoints for 30% faster latency.")
            .with_priority(Priority::High)
            .with_assignee("Alex Rivera")
            .with_story_points(8),
            Task::new(
                "t2",
                "User Interface Design",
                TaskStatus::Done,
                calendar_date(2024, 5, 20),
            )
            .with_project_id("p1")
            .with_description("Design the new telemetry dashboard screens.")
            .with_priority(Priority::Medium)
            .with_assignee("Sarah Chen")
            .with_story_points(5),
        ]);

    let orbit = Project::new("p2", "Orbit Dashboard SDK", "James Miller")
        .with_description("Public SDK for third-party integration with our project tracking APIs.")
        .with_progress(Progress::saturating(30))
        .with_status(ProjectStatus::Active)
        .with_priority(Priority::Medium)
        .with_health(ProjectHealth::Healthy)
        .with_schedule(calendar_date(2024, 2, 15), calendar_date(2024, 9, 30))
        .with_members(["John Doe", "Emily Watson"])
        .with_tasks([Task::new(
            "t3",
            "Documentation Draft",
            TaskStatus::Todo,
            calendar_date(2024, 7, 1),
        )
        .with_project_id("p2")
        .with_description("Write initial README and API endpoint docs.")
        .with_priority(Priority::Medium)
        .with_assignee("John Doe")
        .with_story_points(3)]);

    vec![apollo, orbit]
}
