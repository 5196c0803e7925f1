pub mod palette_graph;
