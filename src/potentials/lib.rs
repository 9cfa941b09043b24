/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate log;

pub mod eam;
pub(crate) mod util;

pub use crate::eam::{Eam, EamError, EamOptions, MixingMethod};
pub use crate::eam::{InteractionData, InteractionFamily, PotentialFamilies, SelfData};
