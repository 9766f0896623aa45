//! Watch face engine and its host callback contract.
//!
//! The host shell owns the engine and calls the `on_*` methods as lifecycle
//! events arrive, then calls [`WatchFaceEngine::render`] whenever
//! [`WatchFaceEngine::take_redraw_request`] reports pending work. Redraw
//! requests are a single flag, so any number of events between two frames
//! collapse into one render of the latest state.
//!
//! Timezone-change notifications are subscribed only while the face is
//! visible. A subscription still held when the engine is dropped is released.

use crate::background::BackgroundAsset;
use crate::clock::{Clock, ClockState, Refresh, TimeZoneSource};
use crate::config::FaceConfig;
use crate::geometry::ScreenGeometry;
use crate::log::EventLog;
use crate::render::{FrameLayout, background_mode, render_frame};
use crate::style::{HandPalette, StyleState};
use crate::surface::Canvas;

// =============================================================================
// Host Event Payloads
// =============================================================================

/// Display capabilities reported once per session. Missing flags read as `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayProperties {
    pub low_bit_ambient: bool,
    pub burn_in_protection: bool,
}

/// Host interruption filter ("do not disturb" level).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptionFilter {
    /// All interruptions allowed.
    #[default]
    All,
    Priority,
    AlarmsOnly,
    /// No interruptions at all; the face dims its hands.
    Silent,
    Unknown,
}

impl InterruptionFilter {
    #[inline]
    pub const fn is_muted(self) -> bool { matches!(self, Self::Silent) }
}

// =============================================================================
// Engine
// =============================================================================

pub struct WatchFaceEngine<C, Z>
where
    C: Clock,
    Z: TimeZoneSource,
{
    clock_source: C,
    zones: Z,
    clock: ClockState,
    geometry: ScreenGeometry,
    style: StyleState,
    background: BackgroundAsset,
    config: FaceConfig,
    properties: Option<DisplayProperties>,
    visible: bool,
    zone_subscribed: bool,
    redraw_requested: bool,
    log: EventLog,
}

impl<C, Z> WatchFaceEngine<C, Z>
where
    C: Clock,
    Z: TimeZoneSource,
{
    /// Create an engine reading time from `clock_source` and zones from `zones`.
    ///
    /// The surface size is unknown until [`Self::on_surface_resized`].
    pub fn new(
        clock_source: C,
        zones: Z,
    ) -> Self {
        let mut log = EventLog::new();
        let timezone = zones.current().unwrap_or_default();
        face_info!(log, "engine start, zone {}", timezone.name());

        let config = FaceConfig::default();
        Self {
            clock: ClockState::new(clock_source.now_ms(), timezone),
            clock_source,
            zones,
            geometry: ScreenGeometry::default(),
            style: StyleState::new(HandPalette::from(&config)),
            background: BackgroundAsset::from_config(&config),
            config,
            properties: None,
            visible: false,
            zone_subscribed: false,
            redraw_requested: false,
            log,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle callbacks
    // -------------------------------------------------------------------------

    /// Surface created: apply the face configuration and load the background.
    ///
    /// Display flags start cleared; the host re-reports them afterwards.
    pub fn on_surface_ready(
        &mut self,
        config: FaceConfig,
    ) {
        self.config = config;
        self.style = StyleState::new(HandPalette::from(&config));
        self.properties = None;
        self.background = BackgroundAsset::from_config(&config);
        if self.geometry.width() > 0 {
            self.background = self.background.scaled_to_width(self.geometry.width());
        }
        face_info!(self.log, "surface ready");
        self.invalidate();
    }

    /// Display capability flags. Expected once per session; later calls still apply.
    ///
    /// Requests a redraw only when the new flags switch the background between
    /// the image and the black fill.
    pub fn on_properties_changed(
        &mut self,
        properties: DisplayProperties,
    ) {
        if self.properties.is_some() {
            face_debug!(self.log, "display properties reported again");
        }
        let before = background_mode(&self.style);
        self.properties = Some(properties);
        self.style.set_low_bit_ambient(properties.low_bit_ambient);
        self.style.set_burn_in_protection(properties.burn_in_protection);
        if background_mode(&self.style) != before {
            self.invalidate();
        }
        face_info!(
            self.log,
            "low-bit {} burn-in {}",
            properties.low_bit_ambient,
            properties.burn_in_protection
        );
    }

    /// Enter or leave ambient mode. Always re-derives paints and requests a redraw.
    pub fn on_ambient_changed(
        &mut self,
        ambient: bool,
    ) {
        self.style.set_ambient(ambient);
        face_info!(self.log, "ambient {}", ambient);
        self.invalidate();
    }

    /// Interruption filter changed. Only an actual mute transition redraws.
    pub fn on_interruption_filter_changed(
        &mut self,
        filter: InterruptionFilter,
    ) {
        let muted = filter.is_muted();
        if self.style.set_muted(muted) {
            face_info!(self.log, "muted {}", muted);
            self.invalidate();
        }
    }

    /// Periodic time tick (once a minute in ambient mode).
    pub fn on_time_tick(&mut self) { self.invalidate(); }

    /// Wall clock was set or synced; the instant may move backwards.
    pub fn on_time_synced(&mut self) {
        let now = self.clock_source.now_ms();
        self.clock.correct(now);
        face_info!(self.log, "time synced");
        self.invalidate();
    }

    /// New surface size: replace geometry and rescale the background.
    pub fn on_surface_resized(
        &mut self,
        width: i32,
        height: i32,
    ) {
        self.geometry = ScreenGeometry::from_signed(width, height);
        self.background = self.background.scaled_to_width(self.geometry.width());

        if self.geometry.is_drawable() {
            face_info!(self.log, "surface {}x{}", width, height);
        } else {
            face_warn!(self.log, "surface {}x{} not drawable", width, height);
        }
        self.invalidate();
    }

    /// Face shown or hidden. Showing refreshes the timezone and subscribes to changes.
    pub fn on_visibility_changed(
        &mut self,
        visible: bool,
    ) {
        self.visible = visible;
        if visible {
            self.subscribe_zone_changes();
            self.refresh_timezone();
            self.invalidate();
        } else {
            self.unsubscribe_zone_changes();
        }
    }

    /// Timezone-change notification from the host broadcast.
    pub fn on_timezone_changed(&mut self) {
        if !self.zone_subscribed {
            face_debug!(self.log, "zone change while unsubscribed");
            return;
        }
        self.refresh_timezone();
        self.invalidate();
    }

    /// Draw one frame of the current time onto `canvas`.
    ///
    /// Reads the clock immediately before drawing and clears any pending redraw request.
    pub fn render<K: Canvas>(
        &mut self,
        canvas: &mut K,
    ) -> FrameLayout {
        let now = self.clock_source.now_ms();
        if self.clock.refresh(now) == Refresh::RejectedBackward {
            face_warn!(self.log, "clock went backwards, holding");
        }

        if !self.geometry.is_drawable() {
            face_debug!(self.log, "no surface size, background only");
        }

        self.redraw_requested = false;
        render_frame(self.clock.local_time(), &self.geometry, &self.style, &self.background, canvas)
    }

    // -------------------------------------------------------------------------
    // Redraw requests
    // -------------------------------------------------------------------------

    /// Request a redraw. Repeated requests before the next frame coalesce.
    #[inline]
    pub fn invalidate(&mut self) { self.redraw_requested = true; }

    #[inline]
    pub const fn is_redraw_requested(&self) -> bool { self.redraw_requested }

    /// Return and clear the pending redraw request.
    #[inline]
    pub fn take_redraw_request(&mut self) -> bool { core::mem::take(&mut self.redraw_requested) }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn clock(&self) -> &ClockState { &self.clock }

    #[inline]
    pub const fn geometry(&self) -> &ScreenGeometry { &self.geometry }

    #[inline]
    pub const fn style(&self) -> &StyleState { &self.style }

    #[inline]
    pub const fn background(&self) -> &BackgroundAsset { &self.background }

    #[inline]
    pub const fn config(&self) -> &FaceConfig { &self.config }

    /// Host hint forwarded from the face configuration.
    #[inline]
    pub const fn show_unread_count_indicator(&self) -> bool { self.config.show_unread_count_indicator }

    #[inline]
    pub const fn is_visible(&self) -> bool { self.visible }

    #[inline]
    pub const fn is_zone_subscribed(&self) -> bool { self.zone_subscribed }

    #[inline]
    pub const fn log(&self) -> &EventLog { &self.log }

    /// Drop log lines the host has already consumed.
    pub fn clear_log(&mut self) { self.log.clear(); }

    #[inline]
    pub fn zones_mut(&mut self) -> &mut Z { &mut self.zones }

    // -------------------------------------------------------------------------
    // Timezone handling
    // -------------------------------------------------------------------------

    fn refresh_timezone(&mut self) {
        match self.zones.current() {
            Some(zone) => {
                if self.clock.set_timezone(Some(zone)) {
                    face_info!(self.log, "zone {}", self.clock.timezone().name());
                }
            }
            None => {
                face_warn!(self.log, "zone unresolved, keeping {}", self.clock.timezone().name());
            }
        }
    }

    fn subscribe_zone_changes(&mut self) {
        if self.zone_subscribed {
            return;
        }
        self.zones.subscribe();
        self.zone_subscribed = true;
        face_debug!(self.log, "zone updates on");
    }

    fn unsubscribe_zone_changes(&mut self) {
        if !self.zone_subscribed {
            return;
        }
        self.zones.unsubscribe();
        self.zone_subscribed = false;
        face_debug!(self.log, "zone updates off");
    }
}

impl<C, Z> Drop for WatchFaceEngine<C, Z>
where
    C: Clock,
    Z: TimeZoneSource,
{
    fn drop(&mut self) { self.unsubscribe_zone_changes(); }
}

// =============================================================================
// Tests
// =============================================================================
