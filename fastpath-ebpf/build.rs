use which::which;

/// Rebuild when bpf-linker changes, since it links the bpfel object.
fn main() {
    let bpf_linker = which("bpf-linker").expect("bpf-linker not found in PATH");
    println!("cargo:rerun-if-changed={}", bpf_linker.display());
}
