use std::path::Path;
use std::process::ExitCode;

use log::info;

use connectome_viz::render::{BevyRender, Render};
use connectome_viz::scene::{self, NodeStyle};
use connectome_viz::{BrainNetwork, PlotError, demo, plot_brain_network};

const DEMO_NODE_COUNT: usize = 48;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => run_demo(),
        [edges, positions, mesh] => run_files(edges, positions, mesh),
        _ => {
            eprintln!("usage: connectome_viz [<edge-list> <positions> <mesh.obj>]");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_files(edges: &str, positions: &str, mesh: &str) -> Result<(), PlotError> {
    let network = BrainNetwork::load_edge_list(Path::new(edges))?;
    let (mut app, sizes) = plot_brain_network(
        &BevyRender,
        &network,
        Path::new(positions),
        Path::new(mesh),
        None,
        None,
    )?;
    info!("computed marker sizes for {} nodes", sizes.len());
    app.run();
    Ok(())
}

fn run_demo() -> Result<(), PlotError> {
    let (network, atlas) = demo::network(DEMO_NODE_COUNT);
    let mesh = demo::shell_mesh(24, 32);
    let (scene, _) = scene::compose(
        &network,
        &atlas,
        &mesh,
        NodeStyle::FromDegree,
        NodeStyle::FromDegree,
    )?;
    let mut app = BevyRender.display(scene);
    app.run();
    Ok(())
}
