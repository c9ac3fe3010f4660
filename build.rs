fn main() {
    println!("cargo:rerun-if-changed=assets/index.html");

    // Host builds (`--no-default-features`) have no ESP-IDF toolchain to
    // describe; only the firmware build needs the sysenv passthrough.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
