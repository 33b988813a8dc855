fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_prost_build::configure()
        .build_client(false)
        .compile_protos(&["proto/customer.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/customer.proto");
    println!("cargo:rerun-if-changed=migrations");

    Ok(())
}
