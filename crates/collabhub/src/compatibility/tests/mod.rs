
use super::{Profile, RelationshipContext};

pub(super) fn web_developer() -> Profile {
    Profile::new(["React", "Node"], ["Web", "AI"])
}

pub(super) fn full_stack_developer() -> Profile {
    Profile::new(["React", "Node", "MongoDB"], ["Web", "ML"])
}

pub(super) fn systems_programmer() -> Profile {
    Profile::new(["Go"], ["Systems"])
}

pub(super) fn designer() -> Profile {
    Profile::new(["Ruby"], ["Design"])
}

pub(super) fn past_collaborators() -> RelationshipContext {
    RelationshipContext {
        past_collaboration: true,
    }
}

pub(super) fn fixture_profiles() -> Vec<Profile> {
    vec![
        web_developer(),
        full_stack_developer(),
        systems_programmer(),
        designer(),
        Profile::default(),
        Profile::new(["rust", "go", "c"], Vec::<String>::new()),
        Profile::new(Vec::<String>::new(), ["design", "ai", "web"]),
    ]
}
