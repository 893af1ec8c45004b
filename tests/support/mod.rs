#![allow(dead_code)]

pub mod assigner_harness;
