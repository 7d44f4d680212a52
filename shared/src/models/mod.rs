//! Data records
//!
//! Plain records mirroring the relational tables. Column names keep the
//! legacy spelling (`Mesa_id`, `dataCriacao`, ...) on the wire and in the store.

pub mod estado;
pub mod mesa;
pub mod pedido;
pub mod pedido_produto;
pub mod produto;
pub mod tipo_produto;
pub mod usuario;

pub use estado::Estado;
pub use mesa::{Mesa, MesaInput};
pub use pedido::{Pedido, PedidoInput};
pub use pedido_produto::{PedidoProduto, PedidoProdutoDetalhado, PedidoProdutoInput};
pub use produto::{Produto, ProdutoDetalhado, ProdutoInput};
pub use tipo_produto::{TipoProduto, TipoProdutoInput};
pub use usuario::{Credenciais, NovoUsuario, Usuario, UsuarioUpdate};
