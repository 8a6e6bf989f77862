pub mod alert;
pub mod campos;
pub mod data_table;
pub mod modal;
pub mod pagination;
pub mod search_bar;

pub use alert::AlertDialog;
pub use campos::{AreaTexto, Campo, Seleccion};
pub use data_table::{Columna, DataTable};
pub use modal::{BotonesModal, Modal};
pub use pagination::Pagination;
pub use search_bar::SearchBar;
