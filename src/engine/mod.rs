pub mod bonus;
pub mod letter_groups;
pub mod mastery;
