//! Graph to network compiler
//!
//! Compilation runs four steps in a fixed order:
//!
//! 1. every graph socket gets its static type from the socket kind table
//! 2. every graph node is handed to the inserter registered for its kind,
//!    or replaced by a dummy when it carries data but has no inserter
//! 3. every linked data input is wired to its source, through an implicit
//!    conversion when the two types differ
//! 4. every data input still without a link gets a default value node
//!
//! The first failure aborts the whole compilation; no partial network is
//! ever returned.

use crate::config::{CompilerConfig, MultiLinkPolicy};
use crate::error::CompileError;
use crate::mappings::{get_mappings, Mappings};
use crate::network::{CompiledNetwork, GraphNetworkBuilder, MappedNetwork, SocketTypes};
use crate::nodes::{NodeGraph, Port, SocketId};
use crate::resources::Resources;
use log::{debug, error, info, warn};

/// Static type of every socket in `graph`; unknown kinds carry no type
pub fn resolve_socket_types(graph: &NodeGraph, mappings: &Mappings) -> SocketTypes {
    graph
        .all_sockets()
        .map(|(socket, port)| (socket, mappings.data_type(&port.idname)))
        .collect()
}

/// Builds the network for `graph`, allocating its functions in `resources`
pub fn generate_network(
    graph: &NodeGraph,
    mappings: &Mappings,
    config: &CompilerConfig,
    resources: &mut Resources,
) -> Result<MappedNetwork, CompileError> {
    let result = run_passes(graph, mappings, config, resources);
    match &result {
        Ok(mapped) => info!(
            "Compiled graph with {} nodes into network with {} nodes and {} links",
            graph.nodes.len(),
            mapped.network.node_count(),
            mapped.network.link_count()
        ),
        Err(e) => error!("Graph compilation failed ({}): {}", e.cause(), e),
    }
    result
}

/// Compiles `graph` with the built-in mappings and default settings
pub fn compile(graph: &NodeGraph) -> Result<CompiledNetwork, CompileError> {
    compile_with(graph, get_mappings(), &CompilerConfig::default())
}

pub fn compile_with(
    graph: &NodeGraph,
    mappings: &Mappings,
    config: &CompilerConfig,
) -> Result<CompiledNetwork, CompileError> {
    let mut resources = Resources::new();
    let MappedNetwork { network, socket_map } = generate_network(graph, mappings, config, &mut resources)?;
    Ok(CompiledNetwork {
        network,
        socket_map,
        resources,
    })
}

fn run_passes(
    graph: &NodeGraph,
    mappings: &Mappings,
    config: &CompilerConfig,
    resources: &mut Resources,
) -> Result<MappedNetwork, CompileError> {
    let types = resolve_socket_types(graph, mappings);
    debug!(
        "Resolved {} sockets, {} carry data",
        types.len(),
        types.values().filter(|data_type| data_type.is_data()).count()
    );

    let mut builder = GraphNetworkBuilder::new(graph, types);
    insert_nodes(&mut builder, resources, mappings)?;
    insert_links(&mut builder, resources, mappings, config)?;
    insert_unlinked_inputs(&mut builder, resources, mappings)?;
    Ok(builder.build()?)
}

fn insert_nodes(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    mappings: &Mappings,
) -> Result<(), CompileError> {
    let graph = builder.graph();
    let mut inserted = 0;
    let mut dummies = 0;

    for node in graph.nodes.values() {
        match mappings.node_inserter(&node.idname) {
            Some(inserter) => {
                inserter(builder, resources, mappings, node)?;
                if !builder.data_sockets_of_node_are_mapped(node) {
                    return Err(CompileError::Internal(format!(
                        "inserter for '{}' left data sockets of node {} unmapped",
                        node.idname, node.id
                    )));
                }
                inserted += 1;
            }
            None if builder.has_data_sockets(node) => {
                warn!("No inserter for node kind '{}', keeping node {} as a dummy", node.idname, node.id);
                builder.add_dummy(node)?;
                dummies += 1;
            }
            None => {}
        }
    }

    debug!(
        "Node pass: {} inserted, {} dummies, {} network nodes",
        inserted,
        dummies,
        builder.node_count()
    );
    Ok(())
}

fn insert_links(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    mappings: &Mappings,
    config: &CompilerConfig,
) -> Result<(), CompileError> {
    let graph = builder.graph();
    let mut direct = 0;
    let mut converted = 0;

    for node in graph.nodes.values() {
        for to_socket in builder.data_inputs(node) {
            let origins = graph.linked_outputs(to_socket);
            let from_socket = match origins.as_slice() {
                [] => continue,
                [from_socket] => *from_socket,
                _ => match config.multi_link {
                    MultiLinkPolicy::Reject => {
                        return Err(CompileError::MultiplyLinkedInput {
                            socket: to_socket,
                            count: origins.len(),
                        })
                    }
                    MultiLinkPolicy::Ignore => {
                        warn!("Ignoring {} links into {}", origins.len(), to_socket);
                        continue;
                    }
                },
            };

            if !builder.is_data_socket(from_socket) {
                return Err(CompileError::UnresolvedSourceType {
                    input: to_socket,
                    output: from_socket,
                });
            }

            let from = builder.lookup_output(from_socket)?;
            let to = builder.lookup_input(to_socket)?;
            let from_type = builder.data_type(from_socket);
            let to_type = builder.data_type(to_socket);

            if from_type == to_type {
                builder.add_link(from, to)?;
                direct += 1;
                continue;
            }

            let from_idname = &port(graph, from_socket)?.idname;
            let to_idname = &port(graph, to_socket)?.idname;
            let inserter = mappings
                .conversion_inserter(from_idname, to_idname)
                .ok_or_else(|| CompileError::MissingConversion {
                    from: from_type,
                    to: to_type,
                    from_idname: from_idname.clone(),
                    to_idname: to_idname.clone(),
                })?;
            let (conversion_in, conversion_out) = inserter(builder, resources)?;
            builder.add_link(from, conversion_in)?;
            builder.add_link(conversion_out, to)?;
            converted += 1;
        }
    }

    debug!("Link pass: {} direct links, {} conversions", direct, converted);
    Ok(())
}

fn insert_unlinked_inputs(
    builder: &mut GraphNetworkBuilder<'_>,
    resources: &mut Resources,
    mappings: &Mappings,
) -> Result<(), CompileError> {
    let graph = builder.graph();
    let unlinked: Vec<SocketId> = graph
        .all_input_sockets()
        .filter(|&socket| builder.is_data_socket(socket) && !builder.is_input_linked(socket))
        .collect();

    for &socket in &unlinked {
        let port = port(graph, socket)?;
        let inserter = mappings
            .input_inserter(&port.idname)
            .ok_or_else(|| CompileError::MissingDefault {
                socket,
                idname: port.idname.clone(),
            })?;
        let from = inserter(builder, resources, port)?;
        let to = builder.lookup_input(socket)?;
        builder.add_link(from, to)?;
    }

    debug!("Default pass: {} unlinked inputs", unlinked.len());
    Ok(())
}

fn port(graph: &NodeGraph, socket: SocketId) -> Result<&Port, CompileError> {
    graph
        .socket(socket)
        .ok_or_else(|| CompileError::Internal(format!("{} does not exist", socket)))
}
