// Native builds only compile the page logic for its tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod contact;
mod cursor;
mod fab;
mod intro;
mod particles;
mod reveal;
mod scroll;
mod tabs;
mod telemetry;
mod theme;
mod tilt;
mod typing;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
