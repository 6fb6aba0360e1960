#![allow(warnings)]
//! Verdaccio Console Frontend Entry Point

mod actions;
mod app;
mod commands;
mod components;
mod context;
mod destructive;
mod draft;
mod errors;
mod listing;
mod markdown;
mod models;
mod notify;
mod package_details;
mod pages;
mod poller;
mod validation;

#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
