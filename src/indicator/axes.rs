//! Axis frame styling for indicator charts.

/// Distance, in points, that [`drop_spines`] moves the left and bottom spines.
pub const SPINE_OFFSET: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinePosition {
    /// Drawn on the edge of the data area.
    Data,
    /// Pushed away from the data area by this many points.
    Outward(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spine {
    pub visible: bool,
    pub position: SpinePosition,
}

impl Default for Spine {
    fn default() -> Self {
        Spine {
            visible: true,
            position: SpinePosition::Data,
        }
    }
}

impl Spine {
    pub fn offset(&self) -> u32 {
        match self.position {
            SpinePosition::Data => 0,
            SpinePosition::Outward(points) => points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XTicks {
    Bottom,
    Top,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YTicks {
    Left,
    Right,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The frame around a chart: four spines and where tick marks go.
pub struct Axes {
    pub left: Spine,
    pub bottom: Spine,
    pub right: Spine,
    pub top: Spine,
    pub x_ticks: XTicks,
    pub y_ticks: YTicks,
}

impl Default for Axes {
    fn default() -> Self {
        Axes {
            left: Spine::default(),
            bottom: Spine::default(),
            right: Spine::default(),
            top: Spine::default(),
            x_ticks: XTicks::Both,
            y_ticks: YTicks::Both,
        }
    }
}

impl Axes {
    pub fn ticks_left(&self) -> bool {
        matches!(self.y_ticks, YTicks::Left | YTicks::Both)
    }

    pub fn ticks_right(&self) -> bool {
        matches!(self.y_ticks, YTicks::Right | YTicks::Both)
    }

    pub fn ticks_bottom(&self) -> bool {
        matches!(self.x_ticks, XTicks::Bottom | XTicks::Both)
    }

    pub fn ticks_top(&self) -> bool {
        matches!(self.x_ticks, XTicks::Top | XTicks::Both)
    }
}

/// Open frame: left and bottom spines offset outward, right and top hidden,
/// ticks only on the left and bottom.
pub fn drop_spines(axes: &mut Axes) -> &mut Axes {
    axes.left.position = SpinePosition::Outward(SPINE_OFFSET);
    axes.bottom.position = SpinePosition::Outward(SPINE_OFFSET);
    axes.right.visible = false;
    axes.top.visible = false;
    axes.y_ticks = YTicks::Left;
    axes.x_ticks = XTicks::Bottom;

    axes
}

// -- Tests -------------------------------------------------------------------
