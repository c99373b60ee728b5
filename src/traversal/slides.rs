//! Slide adapter: slides, shapes (depth-first through groups), text frame
//! paragraphs. Shapes without a text frame contribute nothing.

use super::{DocumentKind, ParagraphContainer};
use crate::domain::{Paragraph, ParagraphLocation, Presentation, Shape};

impl ParagraphContainer for Presentation {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Slides
    }

    fn for_each_paragraph<F>(&mut self, mut f: F)
    where
        F: FnMut(ParagraphLocation, &mut Paragraph),
    {
        let mut path = Vec::new();
        for (slide_idx, slide) in self.slides.iter_mut().enumerate() {
            visit_shapes(slide_idx, &mut slide.shapes, &mut path, &mut f);
        }
    }
}

fn visit_shapes<F>(slide: usize, shapes: &mut [Shape], path: &mut Vec<usize>, f: &mut F)
where
    F: FnMut(ParagraphLocation, &mut Paragraph),
{
    for (shape_idx, shape) in shapes.iter_mut().enumerate() {
        path.push(shape_idx);

        if let Some(frame) = shape.text_frame.as_mut() {
            for (paragraph, para) in frame.paragraphs.iter_mut().enumerate() {
                f(
                    ParagraphLocation::Slide {
                        slide,
                        shape_path: path.clone(),
                        paragraph,
                    },
                    para,
                );
            }
        }
        visit_shapes(slide, &mut shape.children, path, f);

        path.pop();
    }
}
