fn main() {
    println!("cargo:rustc-check-cfg=cfg(docsrs)");

    match std::env::var("CARGO_CFG_TARGET_OS").unwrap().as_str() {
        "linux" | "android" => (),
        os => panic!("Unsupported OS {:?}: the controlling terminal is found through /proc", os),
    }
}
