use anyhow::Result;
use raylib::prelude::*;
use std::path::PathBuf;

/// A host that turns carousel state into frames.
pub trait Engine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, paths: Vec<PathBuf>) -> Result<()>;
    /// Returns `false` once there is nothing left to show.
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool;
    fn shutdown(&mut self);
}
