fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::fs::canonicalize(std::env::var("CARGO_MANIFEST_DIR")?)?;
    let workspace_dir = dir
        .parent()
        .ok_or("unexpected")?
        .parent()
        .ok_or("unexpected")?;
    let proto_dir = workspace_dir.join("proto");
    tonic_build::compile_protos(proto_dir.join("clientapi.proto"))?;
    println!("cargo:rerun-if-changed={}", proto_dir.display());
    Ok(())
}
