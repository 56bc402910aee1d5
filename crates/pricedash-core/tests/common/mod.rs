#![allow(dead_code)]

pub mod listings_server;
