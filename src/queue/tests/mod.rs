//! Test module organization for queue system

pub mod reverse_sort;
