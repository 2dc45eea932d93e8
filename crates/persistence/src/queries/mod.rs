// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every function takes the connection it runs on, so the same query serves
//! plain reads and reads inside a transaction.

pub mod events;
pub mod orders;
pub mod settings;
pub mod students;

use diesel::define_sql_function;
use diesel::sql_types::Text;

define_sql_function! {
    /// SQL `upper()`.
    fn upper(x: Text) -> Text;
}

define_sql_function! {
    /// SQL `replace()`.
    fn replace(x: Text, from: Text, to: Text) -> Text;
}
