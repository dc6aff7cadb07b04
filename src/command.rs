//! This module defines the SCPI vocabulary of the PSU and the builders that assemble
//! complete command strings from it.
//!
//! Builders are pure: they take typed arguments and return the literal command text, which
//! the session then hands to the transport. Numeric arguments always render with a decimal
//! point; Rust's formatter is locale-independent, so the strings are stable no matter what
//! the host locale is.

use std::fmt;

use crate::types::Channel;

/// The fixed set of SCPI keywords used to assemble commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Syst,
    Rem,
    Loc,
    Rst,
    Cls,
    Inst,
    Volt,
    Curr,
    Pow,
    Outp,
    Meas,
    Prot,
    Stat,
}

impl Mnemonic {
    /// The on-wire keyword.
    ///
    /// An explicit match rather than a derived name lookup, so renaming a variant can never
    /// change what the device sees.
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Syst => "SYST",
            Mnemonic::Rem => "REM",
            Mnemonic::Loc => "LOC",
            Mnemonic::Rst => "RST",
            Mnemonic::Cls => "CLS",
            Mnemonic::Inst => "INST",
            Mnemonic::Volt => "VOLT",
            Mnemonic::Curr => "CURR",
            Mnemonic::Pow => "POW",
            Mnemonic::Outp => "OUTP",
            Mnemonic::Meas => "MEAS",
            Mnemonic::Prot => "PROT",
            Mnemonic::Stat => "STAT",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn output_flag(enable: bool) -> &'static str {
    if enable { "1" } else { "0" }
}

/// Put the device into remote-control mode: `:SYST:REM\n`.
pub fn remote_enable() -> String {
    format!(":{}:{}\n", Mnemonic::Syst, Mnemonic::Rem)
}

/// Hand control back to the front panel: `:SYST:LOC\n`.
pub fn go_to_local() -> String {
    format!(":{}:{}\n", Mnemonic::Syst, Mnemonic::Loc)
}

/// Select an output and set its voltage: `:INST <ch>;:VOLT <v>; OUTP <0|1>`.
///
/// The voltage renders with minimal digits (`10`, not `10.00`).
pub fn select_and_set_voltage(channel: impl Into<Channel>, volts: f64, enable: bool) -> String {
    let channel: Channel = channel.into();
    format!(
        ":{} {};:{} {}; {} {}",
        Mnemonic::Inst,
        channel.token(),
        Mnemonic::Volt,
        volts,
        Mnemonic::Outp,
        output_flag(enable),
    )
}

/// Select an output and set voltage and current limit:
/// `:INST <ch>;:VOLT <v>;:CURR <i>; OUTP <0|1>`.
///
/// Both levels render with exactly two fractional digits, regardless of which channel form
/// the caller supplied.
pub fn select_and_set_levels(
    channel: impl Into<Channel>,
    volts: f64,
    amps: f64,
    enable: bool,
) -> String {
    let channel: Channel = channel.into();
    format!(
        ":{} {};:{} {:.2};:{} {:.2}; {} {}",
        Mnemonic::Inst,
        channel.token(),
        Mnemonic::Volt,
        volts,
        Mnemonic::Curr,
        amps,
        Mnemonic::Outp,
        output_flag(enable),
    )
}

/// Query voltage, current, power and protection status of an output in one request:
/// `:INST <ch>;:MEAS:VOLT?;:MEAS:CURR?;:MEAS:POW?;:VOLT:PROT:STAT?\n`.
///
/// The four query clauses are emitted in this fixed order. The reply decoder's
/// [`Measurement`](crate::types::Measurement) ordinals index into the reply by exactly this
/// order, so it must never change.
pub fn measure_all(channel: impl Into<Channel>) -> String {
    let channel: Channel = channel.into();
    format!(
        ":{inst} {ch};:{meas}:{volt}?;:{meas}:{curr}?;:{meas}:{pow}?;:{volt}:{prot}:{stat}?\n",
        inst = Mnemonic::Inst,
        ch = channel.token(),
        meas = Mnemonic::Meas,
        volt = Mnemonic::Volt,
        curr = Mnemonic::Curr,
        pow = Mnemonic::Pow,
        prot = Mnemonic::Prot,
        stat = Mnemonic::Stat,
    )
}

/// Switch the currently selected output on or off: `OUTP <0|1>`.
pub fn output_state(enable: bool) -> String {
    format!("{} {}", Mnemonic::Outp, output_flag(enable))
}

/// Reset the supply and clear its status registers: `*RST;*CLS;`.
pub fn reset_and_clear() -> String {
    format!("*{};*{};", Mnemonic::Rst, Mnemonic::Cls)
}
