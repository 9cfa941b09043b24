/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

pub mod version {
    use eamkit_tasks::VersionInfo;

    pub fn get() -> VersionInfo {
        VersionInfo {
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
