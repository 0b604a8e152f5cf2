//! rom.rs - SystemVerilog ROM emitter for the twiddle tables
//!
//! Renders a [`ZetaTable`] as the `ntt_rom_pkg` package consumed by the RTL.
//! The package exposes two case functions, `get_zeta` and `get_zeta_inv`,
//! indexed by the 7-bit twiddle number.

use alloc::string::String;
use core::fmt::Write;

use kyberlink_params::ring::ZETA_COUNT;

use super::zetas::ZetaTable;

/// Name of the emitted SystemVerilog package
pub const PACKAGE_NAME: &str = "ntt_rom_pkg";

fn render_function(out: &mut String, name: &str, values: &[u16; ZETA_COUNT]) -> core::fmt::Result {
    writeln!(out, "  function automatic logic [15:0] {}(input logic [6:0] idx);", name)?;
    writeln!(out, "    case (idx)")?;
    for (i, v) in values.iter().enumerate() {
        writeln!(out, "      7'd{}: return 16'd{};", i, v)?;
    }
    writeln!(out, "      default: return 16'd0;")?;
    writeln!(out, "    endcase")?;
    writeln!(out, "  endfunction")
}

/// Render both tables as a SystemVerilog package.
pub fn render_package(table: &ZetaTable) -> Result<String, core::fmt::Error> {
    let mut out = String::new();
    render_into(&mut out, table)?;
    Ok(out)
}

fn render_into(out: &mut String, table: &ZetaTable) -> core::fmt::Result {
    writeln!(out, "// Generated by gen-ntt-rom. Do not edit.")?;
    writeln!(out, "// zeta[i] = 17^bitrev7(i) * R mod 3329, R = 2^16")?;
    writeln!(out, "// zeta_inv[i] = zeta[i]^-1 * R^2 mod 3329")?;
    writeln!(out, "package {};", PACKAGE_NAME)?;
    writeln!(out)?;
    render_function(out, "get_zeta", &table.forward)?;
    writeln!(out)?;
    render_function(out, "get_zeta_inv", &table.inverse)?;
    writeln!(out)?;
    writeln!(out, "endpackage : {}", PACKAGE_NAME)
}
