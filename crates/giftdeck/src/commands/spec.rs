const SPEC: &str = r#"GIFTDECK CONTENT FORMAT

A content file is YAML or JSON. It is either a manifest:

    pincode: 1234          # number or string
    content: { ...bundle }

or a bare bundle (accepted by `validate` and `preload`):

    title: "For you"
    gift: 1                # optional calendar index, recorded when opened
    music: "music.mp3"     # path or http(s) URL of the soundtrack
    totalDuration: 180     # seconds; reaching it ends the show
    slides: [ ... ]

SLIDES

Each slide has a type, a startTime (seconds, inclusive), and optionally
an endTime (exclusive). A missing endTime runs to the next slide's
startTime, or to totalDuration for the last slide. backgroundColor
(hex or rgba()) cross-fades on slide changes.

    - type: text
      content: "Happy birthday!"
      className: "text-4xl font-bold"   # utility tokens, optional
      startTime: 0

    - type: image
      src: "/photos/us.jpg"
      alt: "Us at the beach"
      caption: "Summer 2024"
      startTime: 5

    - type: imageGrid
      images: [{ src: "a.jpg" }, { src: "b.jpg" }]
      content: "Remember these?"
      startTime: 12

    - type: videoGrid
      videos: [{ src: "clip1.mp4" }, { src: "clip2.mp4" }]
      startTime: 20

    - type: videoWithSound       # mutes the soundtrack for its window
      src: "toast.mp4"
      hasSound: true             # default true
      startTime: 30

    - type: hearts               # animated finale
      content: "Love you"
      startTime: 40

PLAYBACK

The soundtrack drives the show: each frame maps the playback position to
the slide whose window contains it. Press-and-hold pauses, release
resumes. Swipe left / Right arrow / Space advances; swipe right / Left
arrow goes back. Navigation seeks the soundtrack to the target slide's
startTime. Esc or Q quits.

RULES

Slides must be sorted by startTime, windows must not overlap or have
zero length, and every window must lie within [0, totalDuration].
Gaps between windows are allowed; the previous slide stays up.
"#;

const SHORT_SPEC: &str = r#"GIFTDECK QUICK REFERENCE

  manifest: pincode + content{ music, totalDuration, slides }
  slide types: text | image | imageGrid | videoGrid | videoWithSound | hearts
  timing: startTime inclusive, endTime exclusive (defaults to next start)
  videoWithSound mutes the soundtrack; hold pauses; swipe/arrows navigate
  validate with `giftdeck validate <file>`, media check with `giftdeck preload <file>`
"#;

pub fn run(short: bool) {
    if short {
        print!("{SHORT_SPEC}");
    } else {
        print!("{SPEC}");
    }
}
