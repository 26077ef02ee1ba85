use super::routes::Route;
use crate::visual::VisualizationKind;

/// One piece of a chapter page, in reading order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    /// i18n key of a prose paragraph.
    Paragraph(&'static str),
    /// TeX source, typeset at display time.
    Formula(&'static str),
    Visualization(VisualizationKind),
}

#[derive(Clone, Copy, Debug)]
pub struct Chapter {
    pub title_key: &'static str,
    pub blocks: &'static [Block],
}

impl Chapter {
    /// The diagram embedded in this chapter, if any.
    pub fn visualization(&self) -> Option<VisualizationKind> {
        self.blocks.iter().find_map(|b| match b {
            Block::Visualization(kind) => Some(*kind),
            _ => None,
        })
    }
}

use Block::{Formula, Paragraph, Visualization};

const INTRODUCTION: Chapter = Chapter {
    title_key: "chapter.intro.title",
    blocks: &[
        Paragraph("chapter.intro.p1"),
        Formula("M^n \\subset \\mathbb{R}^{n+k}"),
        Paragraph("chapter.intro.p2"),
        Visualization(VisualizationKind::SurfaceFrame),
        Paragraph("chapter.intro.p3"),
    ],
};

const SUBMANIFOLDS: Chapter = Chapter {
    title_key: "chapter.submanifolds.title",
    blocks: &[
        Paragraph("chapter.submanifolds.p1"),
        Formula("T_p\\mathbb{R}^{n+1} = T_pM \\oplus N_pM"),
        Paragraph("chapter.submanifolds.p2"),
        Visualization(VisualizationKind::SurfaceFrame),
        Paragraph("chapter.submanifolds.p3"),
    ],
};

const SECOND_FUNDAMENTAL_FORM: Chapter = Chapter {
    title_key: "chapter.sff.title",
    blocks: &[
        Paragraph("chapter.sff.p1"),
        Formula("h(X, Y) = (\\nabla_X Y)^{\\perp}"),
        Paragraph("chapter.sff.p2"),
        Formula("\\kappa_n(\\theta) = \\kappa_1 \\cos^2\\theta + \\kappa_2 \\sin^2\\theta"),
        Visualization(VisualizationKind::NormalSections),
        Paragraph("chapter.sff.p3"),
        Formula("K = \\kappa_1 \\kappa_2, \\quad H = (\\kappa_1 + \\kappa_2) / 2"),
    ],
};

const GEODESICS: Chapter = Chapter {
    title_key: "chapter.geodesics.title",
    blocks: &[
        Paragraph("chapter.geodesics.p1"),
        Formula("\\gamma(s) = \\cos s \\, p + \\sin s \\, v"),
        Visualization(VisualizationKind::Geodesics),
        Paragraph("chapter.geodesics.p2"),
        Formula("\\kappa_g = \\cot\\theta_0"),
    ],
};

const CONTACT_NUMBER: Chapter = Chapter {
    title_key: "chapter.contact.title",
    blocks: &[
        Paragraph("chapter.contact.p1"),
        Formula("\\langle h(v, v), h(v, v) \\rangle = \\lambda^2"),
        Paragraph("chapter.contact.p2"),
        Visualization(VisualizationKind::NormalSections),
        Paragraph("chapter.contact.p3"),
    ],
};

const NON_ORIENTABLE: Chapter = Chapter {
    title_key: "chapter.nonorientable.title",
    blocks: &[
        Paragraph("chapter.nonorientable.p1"),
        Formula("\\nu(2\\pi) = -\\nu(0)"),
        Visualization(VisualizationKind::NonOrientable),
        Paragraph("chapter.nonorientable.p2"),
        Formula("\\chi = V - E + F = 0"),
    ],
};

pub fn chapter(route: Route) -> Chapter {
    match route {
        Route::Introduction => INTRODUCTION,
        Route::Submanifolds => SUBMANIFOLDS,
        Route::SecondFundamentalForm => SECOND_FUNDAMENTAL_FORM,
        Route::Geodesics => GEODESICS,
        Route::ContactNumber => CONTACT_NUMBER,
        Route::NonOrientable => NON_ORIENTABLE,
    }
}
