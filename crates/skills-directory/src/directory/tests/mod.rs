mod common;
mod qualification;
mod ranking;
