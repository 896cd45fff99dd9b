/**
 * ng-testgen
 *
 * Generate a Jest spec file next to an Angular source file
 */
use std::process;

fn main() {
    match ng_testgen_cli::main_entry::main(std::env::args().collect()) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
