use super::LABEL_FONT_FACE;
use super::label::ProgressLabel;
use super::model::ArcStroke;
use cairo::Context;
use palette::Srgba;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw_arc(cr: &Context, stroke: &ArcStroke) -> Result<(), cairo::Error> {
    // nothing to stroke for a collapsed ring or an empty sweep
    if !stroke.geometry.is_drawable() || stroke.span.sweep() <= 0.0 {
        return Ok(());
    }

    set_source(cr, stroke.color);
    cr.set_line_width(stroke.width);
    cr.set_line_cap(cairo::LineCap::Butt);
    cr.new_path();
    cr.arc(
        stroke.geometry.center.x,
        stroke.geometry.center.y,
        stroke.geometry.radius,
        stroke.span.start,
        stroke.span.end,
    );
    cr.stroke()
}

pub fn draw_label(cr: &Context, label: &ProgressLabel) -> Result<(), cairo::Error> {
    LabelRenderer::new(label).draw(cr)
}

struct LabelRenderer<'a> {
    label: &'a ProgressLabel,
}

impl<'a> LabelRenderer<'a> {
    fn new(label: &'a ProgressLabel) -> Self {
        Self { label }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.save()?;
        set_source(cr, self.label.color);
        cr.select_font_face(
            LABEL_FONT_FACE,
            cairo::FontSlant::Normal,
            cairo::FontWeight::Normal,
        );

        cr.set_font_size(self.label.numeral_size);
        let numeral = cr.text_extents(&self.label.numeral)?;
        cr.set_font_size(self.label.suffix_size);
        let suffix = cr.text_extents(self.label.suffix())?;

        let width = numeral.x_advance() + suffix.x_advance();
        let height = numeral.height().max(suffix.height());
        let center = self.label.frame.center();

        let frame = &self.label.frame;
        cr.rectangle(frame.x, frame.y, frame.width, frame.height);
        cr.clip();

        // both runs share one baseline, the pair centered as a whole
        cr.move_to(center.x - width / 2.0, center.y + height / 2.0);
        cr.set_font_size(self.label.numeral_size);
        cr.show_text(&self.label.numeral)?;
        cr.set_font_size(self.label.suffix_size);
        cr.show_text(self.label.suffix())?;

        cr.restore()
    }
}
