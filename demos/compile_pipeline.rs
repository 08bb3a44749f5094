//! Compilation pipeline demo.
//!
//! Builds a process that compiles an imaginary `main.c`: a reusable CPU
//! and a consumable memory budget drive five sequential stages. A
//! second run with a tiny memory budget shows later stages being
//! skipped while the process still completes.

use taskpool::{ConsoleReporter, ConsumableResource, Process, ReusableResource, Task};

fn compile_stage(name: &str, description: &str, duration: u32) -> Result<Task, taskpool::ConstructionError> {
    Task::new(
        name,
        description,
        vec!["CentralProcessingUnit", "Memory"],
        duration,
    )
}

fn build_process(name: &str, description: &str, memory_units: u32) -> Result<Process, taskpool::ConstructionError> {
    let mut process = Process::new(name, description, Vec::<String>::new(), 15)?;
    process.add_resource(ReusableResource::new("CentralProcessingUnit", 3)?);
    process.add_resource(ConsumableResource::new("Memory", memory_units)?);
    process.add_child(compile_stage("ScanSourceCode", "Tokenize main.c", 2)?);
    process.add_child(compile_stage("ParseSyntax", "Build syntax tree from tokens", 3)?);
    process.add_child(compile_stage(
        "PerformStaticAnalysis",
        "Check syntax tree for errors",
        4,
    )?);
    process.add_child(compile_stage("GenerateCode", "Generate machine code", 3)?);
    process.add_child(compile_stage("LinkBinary", "Link object files into main.exe", 2)?);
    Ok(process)
}

fn main() -> Result<(), taskpool::ConstructionError> {
    tracing_subscriber::fmt::init();

    let mut reporter = ConsoleReporter;

    println!("Starting compilation simulation...");
    let mut compilation = build_process("CompileMain", "Compile main.c to main.exe", 4096)?;
    compilation.run_with_reporter(&mut reporter);

    println!("\nSimulating compilation with limited memory...");
    let mut limited = build_process("CompileLimited", "Compile main.c with low memory", 2)?;
    let summary = limited.run_with_reporter(&mut reporter);
    println!(
        "Limited run: {} executed, {} skipped",
        summary.executed(),
        summary.skipped()
    );

    Ok(())
}
