use std::env;
use std::path::Path;
use std::process;

use flow_cutter_order::flow_cutter::Config;
use flow_cutter_order::io::{order, routingkit};
use flow_cutter_order::report::measure;

fn main() {
    let mut args = env::args();
    args.next();

    let dir = match args.next() {
        Some(dir) => dir,
        None => {
            eprintln!("usage: nested_dissection_order <routingkit-graph-dir> [--cch] [config_var=value ...]");
            process::exit(1);
        }
    };

    let mut use_cch_reductions = false;
    let mut config = Config::default();
    for arg in args {
        if arg == "--cch" {
            use_cch_reductions = true;
            continue;
        }
        let (var, val) = arg.split_once('=').unwrap_or_else(|| {
            eprintln!("expected var=value, got `{}`", arg);
            process::exit(1);
        });
        if let Err(e) = config.set(var, val) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    let path = Path::new(&dir);
    let kit_graph = routingkit::load(path).expect("could not read routingkit graph directory");
    let graph = measure("make_simple", || kit_graph.to_graph().make_simple()).expect("input graph is not symmetric");

    let node_order = measure("compute order", || {
        if use_cch_reductions {
            flow_cutter_order::dissection::compute_cch_order(&graph, &config)
        } else {
            flow_cutter_order::dissection::compute_nested_dissection_order(&graph, &config)
        }
    });

    let positions = order::positions_from_permutation(&node_order);
    order::save_binary(&positions, path.join("cch_order")).expect("could not write cch_order");
}
