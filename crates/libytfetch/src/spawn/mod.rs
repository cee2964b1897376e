//! Module for all functions that spawn external commands
pub mod ffmpeg;
pub mod multiplatform;
pub mod ytdl;
