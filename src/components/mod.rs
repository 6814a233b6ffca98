pub mod force_graph;
pub mod graph_form;
pub mod matrix_table;
pub mod navbar;
