//! The tap side of the virtual switch.
//!
//! The tap is the switch's only trunk. [`VlanEdge`] holds the tap-wide
//! configuration and routes frames through the transforms in
//! [`crate::vlan`]:
//!
//! ```text
//! tap read  -> from_tap -> (vid, frame) -> clients_on_vlan -> client tunnels
//! client    -> from_client -> outgoing buffer -> to_tap -> tap write
//! ```

#[cfg(feature = "tagging")]
use tracing::debug;

#[cfg(feature = "tagging")]
use crate::config::VlanMode;
use crate::config::{ConfigError, VlanConfig, VlanOptions};
use crate::error::DropReason;
#[cfg(feature = "tagging")]
use crate::vlan::prepend_tag;
use crate::vlan::{should_drop_client_tag, strip_tag};
#[cfg(feature = "tagging")]
use crate::PktBuf;
use crate::{Buf, PktBufMut};

/// A tunnel client seen as an access port.
pub trait VlanClient {
    /// The client's outgoing frame buffer.
    type Buf: PktBufMut;

    /// The client's VLAN configuration; its PVID is the client's VLAN.
    fn vlan(&self) -> &VlanConfig;

    /// The frame the client is about to write to the tap.
    fn outgoing(&mut self) -> &mut Self::Buf;
}

impl<C: VlanClient + ?Sized> VlanClient for &mut C {
    type Buf = C::Buf;

    #[inline]
    fn vlan(&self) -> &VlanConfig {
        (**self).vlan()
    }

    #[inline]
    fn outgoing(&mut self) -> &mut Self::Buf {
        (**self).outgoing()
    }
}

/// Prepare a client's outgoing frame for the tap.
///
/// With `top` the tap configuration:
///
/// | tap mode | client PVID == tap PVID | otherwise |
/// |---|---|---|
/// | `OnlyUntaggedOrPriority` | pass | drop |
/// | `All` | pass | tag with client PVID |
/// | `OnlyTagged` | tag with client PVID | tag with client PVID |
///
/// Frame contents are only looked at by the tagging step.
#[cfg(feature = "tagging")]
pub fn process_outgoing_tap<C: VlanClient + ?Sized>(
    top: &VlanConfig,
    client: &mut C,
) -> Result<(), DropReason> {
    let cfg = *client.vlan();
    match top.mode() {
        VlanMode::OnlyUntaggedOrPriority => {
            if cfg.pvid() != top.pvid() {
                let reason = DropReason::CrossVlan {
                    client: cfg.pvid(),
                    port: top.pvid(),
                };
                debug!(
                    reason = reason.as_str(),
                    vid = cfg.pvid(),
                    pvid = top.pvid(),
                    "dropping frame from wrong vlan"
                );
                client.outgoing().clear();
                return Err(reason);
            }
            debug!(reason = "native-vlan", vid = cfg.pvid(), "passing frame untagged");
            Ok(())
        }
        VlanMode::All => {
            if cfg.pvid() != top.pvid() {
                prepend_tag(&cfg, client.outgoing())
            } else {
                debug!(reason = "native-vlan", vid = cfg.pvid(), "passing frame untagged");
                Ok(())
            }
        }
        VlanMode::OnlyTagged => prepend_tag(&cfg, client.outgoing()),
    }
}

/// Does nothing; VLAN tagging is not compiled in.
#[cfg(not(feature = "tagging"))]
#[inline]
pub fn process_outgoing_tap<C: VlanClient + ?Sized>(
    _top: &VlanConfig,
    _client: &mut C,
) -> Result<(), DropReason> {
    Ok(())
}

/// The tap port of the virtual switch.
///
/// Without a configuration VLAN tagging is off: frames pass both ways
/// untouched and every client hears every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VlanEdge {
    top: Option<VlanConfig>,
}

impl VlanEdge {
    /// A tap port with the given configuration, `None` to disable tagging.
    ///
    /// Without the `tagging` feature the configuration is ignored and the
    /// port behaves as disabled.
    pub const fn new(top: Option<VlanConfig>) -> Self {
        if cfg!(feature = "tagging") {
            Self { top }
        } else {
            Self { top: None }
        }
    }

    /// Build the tap port from unvalidated options.
    pub fn from_options(opts: &VlanOptions) -> Result<Self, ConfigError> {
        opts.validate().map(Self::new)
    }

    /// The tap configuration, if tagging is enabled.
    #[inline]
    pub fn config(&self) -> Option<&VlanConfig> {
        self.top.as_ref()
    }

    /// Whether VLAN tagging is on for this port.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.top.is_some()
    }

    /// The configuration of a client whose session assigns it `pvid`.
    ///
    /// The client inherits the tap mode. `None` when tagging is off.
    pub fn client_config(&self, pvid: u16) -> Result<Option<VlanConfig>, ConfigError> {
        self.top.map(|top| top.with_pvid(pvid)).transpose()
    }

    /// Classify a frame read from the tap, see [`strip_tag`].
    ///
    /// Returns VID 0 when tagging is off.
    pub fn from_tap<T: PktBufMut>(&self, buf: &mut T) -> Result<u16, DropReason> {
        match &self.top {
            Some(top) => strip_tag(top, buf),
            None => Ok(0),
        }
    }

    /// Whether a frame received from a client must be dropped, see
    /// [`should_drop_client_tag`].
    pub fn from_client<T: Buf + ?Sized>(&self, buf: &T) -> bool {
        self.top.is_some() && should_drop_client_tag(buf)
    }

    /// Prepare a client's outgoing frame for the tap, see
    /// [`process_outgoing_tap`].
    pub fn to_tap<C: VlanClient + ?Sized>(&self, client: &mut C) -> Result<(), DropReason> {
        match &self.top {
            Some(top) => process_outgoing_tap(top, client),
            None => Ok(()),
        }
    }

    /// The clients that should receive a tap frame classified as `vid`, in
    /// the order given.
    pub fn clients_on_vlan<'c, C, I>(&self, vid: u16, clients: I) -> impl Iterator<Item = &'c C>
    where
        C: VlanClient + 'c,
        I: IntoIterator<Item = &'c C>,
    {
        let enabled = self.top.is_some();
        clients
            .into_iter()
            .filter(move |client| !enabled || client.vlan().pvid() == vid)
    }
}
